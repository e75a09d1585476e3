use super::{Comma, Formatter, Params, ToSql};

use classbase_core::stmt::{self, AlterTableAction, Statement};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::AlterTable(stmt) => stmt.to_sql(f),
            Statement::CreateIndex(stmt) => stmt.to_sql(f),
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::DropIndex(stmt) => stmt.to_sql(f),
            Statement::DropTable(stmt) => stmt.to_sql(f),
            Statement::Exists(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Query(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::ColumnDef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, &self.name, " ", self.ty);
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let if_not_exists = self.if_not_exists.then_some("IF NOT EXISTS ");

        fmt!(
            f,
            "CREATE TABLE ",
            if_not_exists,
            &self.name,
            " (",
            Comma(&self.columns)
        );

        if !self.primary_key.is_empty() {
            fmt!(f, ", PRIMARY KEY (", Comma(&self.primary_key), ")");
        }

        fmt!(f, ")");
    }
}

impl ToSql for &stmt::CreateIndex {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let unique = self.unique.then_some("UNIQUE ");
        let if_not_exists = self.if_not_exists.then_some("IF NOT EXISTS ");

        fmt!(
            f,
            "CREATE ",
            unique,
            "INDEX ",
            if_not_exists,
            &self.name,
            " ON ",
            &self.on,
            " (",
            Comma(&self.columns),
            ")"
        );
    }
}

impl ToSql for &stmt::AlterTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "ALTER TABLE ", &self.name, " ");

        match &self.action {
            AlterTableAction::AddColumn {
                column,
                if_not_exists,
            } => {
                let if_not_exists = if_not_exists.then_some("IF NOT EXISTS ");
                fmt!(f, "ADD COLUMN ", if_not_exists, column);
            }
            AlterTableAction::DropColumn { name, if_exists } => {
                let if_exists = if_exists.then_some("IF EXISTS ");
                fmt!(f, "DROP COLUMN ", if_exists, name);
            }
        }
    }
}

impl ToSql for &stmt::DropTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let if_exists = self.if_exists.then_some("IF EXISTS ");
        fmt!(f, "DROP TABLE ", if_exists, Comma(&self.names));
    }
}

impl ToSql for &stmt::DropIndex {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let if_exists = self.if_exists.then_some("IF EXISTS ");
        fmt!(f, "DROP INDEX ", if_exists, Comma(&self.names));
    }
}

impl ToSql for &stmt::Filter {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, " WHERE ", &self.column, " = ", &self.value);
    }
}

impl ToSql for &stmt::Query {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let for_update = self.for_update.then_some(" FOR UPDATE");

        fmt!(
            f,
            "SELECT ",
            Comma(&self.columns),
            " FROM ",
            &self.table,
            self.filter.as_ref(),
            for_update
        );
    }
}

impl ToSql for &stmt::Exists {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "SELECT EXISTS (SELECT 1 FROM ", &self.table, &self.filter, ")");
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(
            f,
            "INSERT INTO ",
            &self.table,
            " (",
            Comma(&self.columns),
            ") VALUES (",
            Comma(&self.values),
            ")"
        );
    }
}

struct Assignment<'a>(&'a (stmt::Name, stmt::Value));

impl ToSql for Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let (column, value) = self.0;
        fmt!(f, column, " = ", value);
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(
            f,
            "UPDATE ",
            &self.table,
            " SET ",
            Comma(self.assignments.iter().map(Assignment)),
            &self.filter
        );
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "DELETE FROM ", &self.table, &self.filter);
    }
}
