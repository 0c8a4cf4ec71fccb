//! Explicit table definitions.
//!
//! The repository renders all of its SQL from a [`TableSchema`], so the record
//! shape in [`super::Product`] stays independent from the storage binding.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub definition: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub table: &'static str,
    pub columns: &'static [Column],
}

/// Identity values are never reused, so a deleted id stays dead.
pub const PRODUCTS: TableSchema = TableSchema {
    table: "products",
    columns: &[
        Column {
            name: "id",
            definition: "BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY",
        },
        Column {
            name: "name",
            definition: "VARCHAR(100) NOT NULL CHECK (name <> '')",
        },
        Column {
            name: "price",
            definition: "DOUBLE PRECISION NOT NULL CHECK (price > 0)",
        },
        Column {
            name: "availability",
            definition: "BOOLEAN NOT NULL DEFAULT TRUE",
        },
        Column {
            name: "created_at",
            definition: "TIMESTAMPTZ NOT NULL DEFAULT NOW()",
        },
        Column {
            name: "updated_at",
            definition: "TIMESTAMPTZ NOT NULL DEFAULT NOW()",
        },
    ],
};

impl TableSchema {
    /// Comma separated column names, in declaration order.
    #[must_use]
    pub fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|column| column.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Idempotent DDL used to synchronize the table at startup.
    #[must_use]
    pub fn create_table_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|column| format!("    {} {}", column.name, column.definition))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("CREATE TABLE IF NOT EXISTS {} (\n{columns}\n)", self.table)
    }
}
