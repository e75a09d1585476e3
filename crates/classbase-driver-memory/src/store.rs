use classbase_core::{
    driver::Response,
    schema::ColumnType,
    stmt::{self, AlterTableAction, Filter, Statement, Value, ValueRecord},
    Error, Result,
};
use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone, Default)]
pub(crate) struct Store {
    pub(crate) tables: IndexMap<String, Table>,
    pub(crate) indexes: IndexMap<String, Index>,
}

#[derive(Debug, Clone)]
pub(crate) struct Table {
    pub(crate) columns: IndexMap<String, ColumnType>,
    primary_key: Vec<String>,

    /// Values in column order.
    rows: Vec<Vec<Value>>,
}

#[derive(Debug, Clone)]
pub(crate) struct Index {
    table: String,
    columns: Vec<String>,
}

/// Error reported by the store, worded like the PostgreSQL errors for the
/// same condition.
#[derive(Debug)]
struct StoreError(String);

impl std::error::Error for StoreError {}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! fail {
    ($($arg:tt)*) => {
        return Err(Error::driver(StoreError(format!($($arg)*))))
    };
}

impl Store {
    /// Applies one statement. On error the store may be partially modified;
    /// callers apply statements to a copy.
    pub(crate) fn apply(&mut self, stmt: &Statement) -> Result<Response> {
        match stmt {
            Statement::AlterTable(stmt) => self.alter_table(stmt),
            Statement::CreateIndex(stmt) => self.create_index(stmt),
            Statement::CreateTable(stmt) => self.create_table(stmt),
            Statement::Delete(stmt) => self.delete(stmt),
            Statement::DropIndex(stmt) => self.drop_index(stmt),
            Statement::DropTable(stmt) => self.drop_table(stmt),
            Statement::Exists(stmt) => self.exists(stmt),
            Statement::Insert(stmt) => self.insert(stmt),
            Statement::Query(stmt) => self.query(stmt),
            Statement::Update(stmt) => self.update(stmt),
        }
    }

    fn table(&self, name: &stmt::Name) -> Result<&Table> {
        match self.tables.get(name.as_str()) {
            Some(table) => Ok(table),
            None => fail!("relation \"{name}\" does not exist"),
        }
    }

    fn table_mut(&mut self, name: &stmt::Name) -> Result<&mut Table> {
        match self.tables.get_mut(name.as_str()) {
            Some(table) => Ok(table),
            None => fail!("relation \"{name}\" does not exist"),
        }
    }

    fn create_table(&mut self, stmt: &stmt::CreateTable) -> Result<Response> {
        if self.tables.contains_key(stmt.name.as_str()) {
            if stmt.if_not_exists {
                return Ok(Response::empty());
            }
            fail!("relation \"{}\" already exists", stmt.name);
        }

        let mut columns = IndexMap::new();
        for column in &stmt.columns {
            if columns.insert(column.name.to_string(), column.ty).is_some() {
                fail!("column \"{}\" specified more than once", column.name);
            }
        }

        for key in &stmt.primary_key {
            if !columns.contains_key(key.as_str()) {
                fail!("column \"{key}\" named in key does not exist");
            }
        }

        self.tables.insert(
            stmt.name.to_string(),
            Table {
                columns,
                primary_key: stmt.primary_key.iter().map(ToString::to_string).collect(),
                rows: vec![],
            },
        );

        Ok(Response::empty())
    }

    fn create_index(&mut self, stmt: &stmt::CreateIndex) -> Result<Response> {
        if self.indexes.contains_key(stmt.name.as_str()) {
            if stmt.if_not_exists {
                return Ok(Response::empty());
            }
            fail!("relation \"{}\" already exists", stmt.name);
        }

        let table = self.table(&stmt.on)?;
        for column in &stmt.columns {
            if !table.columns.contains_key(column.as_str()) {
                fail!("column \"{column}\" does not exist");
            }
        }

        self.indexes.insert(
            stmt.name.to_string(),
            Index {
                table: stmt.on.to_string(),
                columns: stmt.columns.iter().map(ToString::to_string).collect(),
            },
        );

        Ok(Response::empty())
    }

    fn alter_table(&mut self, stmt: &stmt::AlterTable) -> Result<Response> {
        let table_name = &stmt.name;
        let table = self.table_mut(table_name)?;

        match &stmt.action {
            AlterTableAction::AddColumn {
                column,
                if_not_exists,
            } => {
                if table.columns.contains_key(column.name.as_str()) {
                    if *if_not_exists {
                        return Ok(Response::empty());
                    }
                    fail!(
                        "column \"{}\" of relation \"{table_name}\" already exists",
                        column.name
                    );
                }

                table.columns.insert(column.name.to_string(), column.ty);
                for row in &mut table.rows {
                    row.push(Value::Null);
                }
            }
            AlterTableAction::DropColumn { name, if_exists } => {
                let Some(position) = table.columns.get_index_of(name.as_str()) else {
                    if *if_exists {
                        return Ok(Response::empty());
                    }
                    fail!("column \"{name}\" of relation \"{table_name}\" does not exist");
                };

                table.columns.shift_remove_index(position);
                table.primary_key.retain(|key| key != name.as_str());
                for row in &mut table.rows {
                    row.remove(position);
                }

                // Indexes covering the column go away with it
                self.indexes.retain(|_, index| {
                    index.table != table_name.as_str()
                        || !index.columns.iter().any(|column| column == name.as_str())
                });
            }
        }

        Ok(Response::empty())
    }

    fn drop_table(&mut self, stmt: &stmt::DropTable) -> Result<Response> {
        for name in &stmt.names {
            if !self.tables.contains_key(name.as_str()) && !stmt.if_exists {
                fail!("table \"{name}\" does not exist");
            }
        }

        for name in &stmt.names {
            self.tables.shift_remove(name.as_str());
            self.indexes.retain(|_, index| index.table != name.as_str());
        }

        Ok(Response::empty())
    }

    fn drop_index(&mut self, stmt: &stmt::DropIndex) -> Result<Response> {
        for name in &stmt.names {
            if !self.indexes.contains_key(name.as_str()) && !stmt.if_exists {
                fail!("index \"{name}\" does not exist");
            }
        }

        for name in &stmt.names {
            self.indexes.shift_remove(name.as_str());
        }

        Ok(Response::empty())
    }

    fn query(&self, stmt: &stmt::Query) -> Result<Response> {
        let table = self.table(&stmt.table)?;
        let positions = stmt
            .columns
            .iter()
            .map(|column| table.position(column))
            .collect::<Result<Vec<_>>>()?;

        let rows = table
            .matching(stmt.filter.as_ref())?
            .map(|row| {
                ValueRecord::from_vec(positions.iter().map(|i| table.rows[row][*i].clone()).collect())
            })
            .collect();

        Ok(Response::values(rows))
    }

    fn exists(&self, stmt: &stmt::Exists) -> Result<Response> {
        let table = self.table(&stmt.table)?;
        let exists = table.matching(Some(&stmt.filter))?.next().is_some();
        Ok(Response::values(vec![ValueRecord::from_vec(vec![Value::Bool(exists)])]))
    }

    fn insert(&mut self, stmt: &stmt::Insert) -> Result<Response> {
        let table_name = &stmt.table;
        let table = self.table_mut(table_name)?;

        if stmt.columns.len() != stmt.values.len() {
            fail!("INSERT has more target columns than expressions");
        }

        let mut row = vec![Value::Null; table.columns.len()];
        for (column, value) in stmt.columns.iter().zip(&stmt.values) {
            row[table.position(column)?] = value.clone();
        }

        let key = table.key_of(&row);
        if !key.is_empty() && table.rows.iter().any(|existing| table.key_of(existing) == key) {
            fail!("duplicate key value violates unique constraint \"{table_name}_pkey\"");
        }

        table.rows.push(row);
        Ok(Response::count(1))
    }

    fn update(&mut self, stmt: &stmt::Update) -> Result<Response> {
        let table = self.table_mut(&stmt.table)?;

        let assignments = stmt
            .assignments
            .iter()
            .map(|(column, value)| Ok((table.position(column)?, value)))
            .collect::<Result<Vec<_>>>()?;

        let rows = table.matching(Some(&stmt.filter))?.collect::<Vec<_>>();
        for row in &rows {
            for (position, value) in &assignments {
                table.rows[*row][*position] = (*value).clone();
            }
        }

        Ok(Response::count(rows.len() as u64))
    }

    fn delete(&mut self, stmt: &stmt::Delete) -> Result<Response> {
        let table = self.table_mut(&stmt.table)?;

        let rows = table.matching(Some(&stmt.filter))?.collect::<Vec<_>>();
        for row in rows.iter().rev() {
            table.rows.remove(*row);
        }

        Ok(Response::count(rows.len() as u64))
    }
}

impl Table {
    fn position(&self, column: &stmt::Name) -> Result<usize> {
        match self.columns.get_index_of(column.as_str()) {
            Some(position) => Ok(position),
            None => fail!("column \"{column}\" does not exist"),
        }
    }

    fn key_of(&self, row: &[Value]) -> Vec<Value> {
        self.primary_key
            .iter()
            .filter_map(|key| self.columns.get_index_of(key.as_str()))
            .map(|position| row[position].clone())
            .collect()
    }

    /// Indices of the rows matching `filter`.
    fn matching<'a>(
        &'a self,
        filter: Option<&'a Filter>,
    ) -> Result<impl Iterator<Item = usize> + 'a> {
        let filter = match filter {
            Some(filter) => Some((self.position(&filter.column)?, &filter.value)),
            None => None,
        };

        Ok(self
            .rows
            .iter()
            .enumerate()
            .filter(move |(_, row)| match filter {
                Some((position, value)) => row[position] == *value,
                None => true,
            })
            .map(|(i, _)| i))
    }
}
