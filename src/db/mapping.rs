//! Row to entity mapping for the `coffees` table

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Row};

use super::StoreError;
use crate::models::Coffee;

/// Read every coffee row. The store decides the order.
pub const SELECT_ALL: &str =
    "SELECT id, name, image, roast, region, price, grind_unit, created_at, updated_at FROM coffees";

pub const SELECT_BY_ID: &str =
    "SELECT id, name, image, roast, region, price, grind_unit, created_at, updated_at FROM coffees WHERE id = $1";

pub const INSERT_ONE: &str = "INSERT INTO coffees(name, image, region, roast, price, grind_unit, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id";

/// Typed access to the columns of a result row by position
pub trait ColumnSource {
    fn column_count(&self) -> usize;
    fn text(&self, index: usize) -> Result<String, sqlx::Error>;
    fn float(&self, index: usize) -> Result<f64, sqlx::Error>;
    fn small_int(&self, index: usize) -> Result<i16, sqlx::Error>;
    fn timestamp(&self, index: usize) -> Result<DateTime<Utc>, sqlx::Error>;
}

impl ColumnSource for PgRow {
    fn column_count(&self) -> usize {
        self.len()
    }

    fn text(&self, index: usize) -> Result<String, sqlx::Error> {
        self.try_get(index)
    }

    fn float(&self, index: usize) -> Result<f64, sqlx::Error> {
        self.try_get(index)
    }

    fn small_int(&self, index: usize) -> Result<i16, sqlx::Error> {
        self.try_get(index)
    }

    fn timestamp(&self, index: usize) -> Result<DateTime<Utc>, sqlx::Error> {
        self.try_get(index)
    }
}

type Decoder = fn(&dyn ColumnSource, usize, &mut Coffee) -> Result<(), sqlx::Error>;

/// One selected column and how it lands in a `Coffee`
pub struct Column {
    pub name: &'static str,
    decode: Decoder,
}

macro_rules! column {
    ($name:literal => $field:ident via $read:ident) => {
        Column {
            name: $name,
            decode: |row, index, coffee| {
                coffee.$field = row.$read(index)?;
                Ok(())
            },
        }
    };
}

/// Selected columns, in the position they appear in `SELECT_ALL` and `SELECT_BY_ID`
pub const COFFEE_COLUMNS: [Column; 9] = [
    column!("id" => id via text),
    column!("name" => name via text),
    column!("image" => image via text),
    column!("roast" => roast via text),
    column!("region" => region via text),
    column!("price" => price via float),
    column!("grind_unit" => grind_unit via small_int),
    column!("created_at" => created_at via timestamp),
    column!("updated_at" => updated_at via timestamp),
];

/// Decode a full row into a new entity, failing on the first column that does not fit
pub fn decode_row(row: &dyn ColumnSource) -> Result<Coffee, StoreError> {
    let found = row.column_count();
    if found != COFFEE_COLUMNS.len() {
        return Err(StoreError::ColumnCount {
            expected: COFFEE_COLUMNS.len(),
            found,
        });
    }

    let mut coffee = Coffee::default();
    for (index, column) in COFFEE_COLUMNS.iter().enumerate() {
        (column.decode)(row, index, &mut coffee).map_err(|source| StoreError::Column {
            column: column.name,
            source,
        })?;
    }

    Ok(coffee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    /// Row backed by JSON values, standing in for a driver row
    struct FakeRow(Vec<Value>);

    impl FakeRow {
        fn get(&self, index: usize) -> Result<&Value, sqlx::Error> {
            self.0.get(index).ok_or(sqlx::Error::ColumnIndexOutOfBounds {
                index,
                len: self.0.len(),
            })
        }

        fn mismatch(index: usize, expected: &str) -> sqlx::Error {
            sqlx::Error::ColumnDecode {
                index: index.to_string(),
                source: format!("expected {}", expected).into(),
            }
        }
    }

    impl ColumnSource for FakeRow {
        fn column_count(&self) -> usize {
            self.0.len()
        }

        fn text(&self, index: usize) -> Result<String, sqlx::Error> {
            self.get(index)?
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| Self::mismatch(index, "text"))
        }

        fn float(&self, index: usize) -> Result<f64, sqlx::Error> {
            self.get(index)?
                .as_f64()
                .ok_or_else(|| Self::mismatch(index, "float"))
        }

        fn small_int(&self, index: usize) -> Result<i16, sqlx::Error> {
            self.get(index)?
                .as_i64()
                .and_then(|v| i16::try_from(v).ok())
                .ok_or_else(|| Self::mismatch(index, "smallint"))
        }

        fn timestamp(&self, index: usize) -> Result<DateTime<Utc>, sqlx::Error> {
            self.get(index)?
                .as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|t| t.with_timezone(&Utc))
                .ok_or_else(|| Self::mismatch(index, "timestamptz"))
        }
    }

    fn brazil_row() -> Vec<Value> {
        vec![
            json!("1"),
            json!("TestCoffee1"),
            json!("image1.jpg"),
            json!("Medium"),
            json!("Brazil"),
            json!(5.99),
            json!(1),
            json!("2023-09-28T18:24:13Z"),
            json!("2023-09-29T08:00:00Z"),
        ]
    }

    #[test]
    fn test_select_lists_mapped_columns_in_order() {
        let names: Vec<&str> = COFFEE_COLUMNS.iter().map(|c| c.name).collect();
        let projection = format!("SELECT {} FROM coffees", names.join(", "));

        assert_eq!(SELECT_ALL, projection);
        assert!(SELECT_BY_ID.starts_with(&projection));
    }

    #[test]
    fn test_decode_row_maps_by_position() {
        let coffee = decode_row(&FakeRow(brazil_row())).unwrap();

        assert_eq!(coffee.id, "1");
        assert_eq!(coffee.name, "TestCoffee1");
        assert_eq!(coffee.image, "image1.jpg");
        assert_eq!(coffee.roast, "Medium");
        assert_eq!(coffee.region, "Brazil");
        assert_eq!(coffee.price, 5.99);
        assert_eq!(coffee.grind_unit, 1);
        assert_eq!(coffee.created_at.to_rfc3339(), "2023-09-28T18:24:13+00:00");
        assert_eq!(coffee.updated_at.to_rfc3339(), "2023-09-29T08:00:00+00:00");
    }

    #[test]
    fn test_decode_row_rejects_short_row() {
        let row = FakeRow(vec![json!(1), json!("TestCoffee1")]);

        match decode_row(&row) {
            Err(StoreError::ColumnCount { expected, found }) => {
                assert_eq!(expected, 9);
                assert_eq!(found, 2);
            }
            other => panic!("expected column count error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_row_names_failing_column() {
        let mut values = brazil_row();
        values[5] = json!("five ninety-nine");

        match decode_row(&FakeRow(values)) {
            Err(StoreError::Column { column, .. }) => assert_eq!(column, "price"),
            other => panic!("expected column error, got {:?}", other),
        }
    }

    #[test]
    fn test_rows_abort_on_first_bad_row() {
        let mut bad = brazil_row();
        bad[6] = json!(70000);
        let rows = vec![FakeRow(brazil_row()), FakeRow(bad), FakeRow(brazil_row())];

        let result: Result<Vec<Coffee>, StoreError> =
            rows.iter().map(|row| decode_row(row)).collect();

        assert!(matches!(
            result,
            Err(StoreError::Column { column: "grind_unit", .. })
        ));
    }
}
