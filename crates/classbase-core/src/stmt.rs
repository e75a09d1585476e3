//! Typed statements issued by the migration engine.
//!
//! Each statement is built by a constructor on [`Statement`] from validated
//! schema types and serialized to SQL by `classbase-sql`. Identifiers come
//! from validated names; values are always carried as parameters.

mod alter_table;
pub use alter_table::{AlterTable, AlterTableAction};

mod column_def;
pub use column_def::ColumnDef;

mod create_index;
pub use create_index::CreateIndex;

mod create_table;
pub use create_table::CreateTable;

mod delete;
pub use delete::Delete;

mod drop_index;
pub use drop_index::DropIndex;

mod drop_table;
pub use drop_table::DropTable;

mod insert;
pub use insert::Insert;

mod name;
pub use name::Name;

mod query;
pub use query::{Exists, Filter, Query};

mod update;
pub use update::Update;

mod value;
pub use value::{Value, ValueRecord};

/// Name of the catalog table holding one serialized schema per class.
pub const CATALOG_TABLE: &str = "_SCHEMA";

/// Catalog column holding the class name, the catalog's primary key.
pub const CATALOG_CLASS_NAME: &str = "className";

/// Catalog column holding the serialized schema.
pub const CATALOG_SCHEMA: &str = "schema";

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    AlterTable(AlterTable),
    CreateIndex(CreateIndex),
    CreateTable(CreateTable),
    Delete(Delete),
    DropIndex(DropIndex),
    DropTable(DropTable),
    Exists(Exists),
    Insert(Insert),
    Query(Query),
    Update(Update),
}

impl Statement {
    /// Returns `true` if the statement produces rows.
    pub fn returns_rows(&self) -> bool {
        matches!(self, Statement::Query(_) | Statement::Exists(_))
    }

    /// Returns `true` for schema changing statements.
    pub fn is_ddl(&self) -> bool {
        matches!(
            self,
            Statement::AlterTable(_)
                | Statement::CreateIndex(_)
                | Statement::CreateTable(_)
                | Statement::DropIndex(_)
                | Statement::DropTable(_)
        )
    }
}
