//! Table descriptions and the statement text derived from them.
//!
//! All statements list data columns in declared order, so positional
//! parameters and decoded row positions always agree.

/// Table name, primary key column and data columns in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    /// Case-preserving table name; always quoted in SQL.
    pub table: &'static str,
    pub id_column: &'static str,
    /// Data columns, excluding the primary key.
    pub columns: &'static [&'static str],
}

impl TableSpec {
    /// `SELECT id, c1.. FROM "T" ORDER BY id`.
    pub fn select_sql(&self) -> String {
        format!(
            "SELECT {}, {} FROM \"{}\" ORDER BY {}",
            self.id_column,
            self.columns.join(", "),
            self.table,
            self.id_column
        )
    }

    /// `INSERT INTO "T" (c1..) VALUES (?1..)`.
    pub fn insert_sql(&self) -> String {
        let placeholders = (1..=self.columns.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO \"{}\" ({}) VALUES ({})",
            self.table,
            self.columns.join(", "),
            placeholders
        )
    }

    /// `UPDATE "T" SET c1 = ?1.. WHERE id = ?N+1`.
    pub fn update_sql(&self) -> String {
        let assignments = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE \"{}\" SET {} WHERE {} = ?{}",
            self.table,
            assignments,
            self.id_column,
            self.columns.len() + 1
        )
    }

    /// `DELETE FROM "T" WHERE id = ?1`.
    pub fn delete_sql(&self) -> String {
        format!(
            "DELETE FROM \"{}\" WHERE {} = ?1",
            self.table, self.id_column
        )
    }
}
