mod value;
pub(crate) use value::Value;

use classbase_core::{
    async_trait,
    driver::{Operation, Response, Transaction},
    err, stmt, Driver, Error, Result,
};
use classbase_sql as sql;
use tokio_postgres::{
    tls::MakeTlsConnect,
    types::{ToSql, Type},
    Client, Column, Config, Row, Socket,
};
use url::Url;

#[derive(Debug, Clone)]
pub struct PostgreSQL {
    config: Config,
}

impl PostgreSQL {
    /// Builds a driver from a `postgresql://` connection string. No
    /// connection is opened until [`Driver::connect`] is called.
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| err!("invalid connection URL: {e}"))?;

        if url.scheme() != "postgresql" {
            return Err(err!(
                "connection URL does not have a `postgresql` scheme; url={}",
                url
            ));
        }

        let host = url
            .host_str()
            .ok_or_else(|| err!("missing host in connection URL; url={}", url))?;

        if url.path().is_empty() || url.path() == "/" {
            return Err(err!(
                "no database specified - missing path in connection URL; url={}",
                url
            ));
        }

        let mut config = Config::new();
        config.host(host);
        config.dbname(url.path().trim_start_matches('/'));

        if let Some(port) = url.port() {
            config.port(port);
        }

        if !url.username().is_empty() {
            config.user(url.username());
        }

        if let Some(password) = url.password() {
            config.password(password);
        }

        Ok(Self::from_config(config))
    }

    /// Builds a driver from a [`tokio_postgres::Config`].
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Opens a connection using the given TLS connector.
    pub async fn connect_with_tls<T>(&self, tls: T) -> Result<Connection>
    where
        T: MakeTlsConnect<Socket> + 'static,
        T::Stream: Send,
    {
        let (client, connection) = self.config.connect(tls).await.map_err(Error::driver)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(error = %e, "postgresql connection error");
            }
        });

        Ok(Connection::new(client))
    }
}

#[async_trait]
impl Driver for PostgreSQL {
    async fn connect(&self) -> Result<Box<dyn classbase_core::Connection>> {
        let connection = self.connect_with_tls(tokio_postgres::NoTls).await?;
        Ok(Box::new(connection))
    }
}

/// A single PostgreSQL session. Dropping it closes the session, which
/// aborts any transaction still open on it.
#[derive(Debug)]
pub struct Connection {
    client: Client,
}

impl Connection {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn transaction(&mut self, op: Transaction) -> Result<Response> {
        let sql = sql::Serializer::postgresql().serialize_transaction(&op);
        tracing::debug!(sql = %sql, "postgresql transaction");

        self.client.batch_execute(&sql).await.map_err(Error::driver)?;
        Ok(Response::empty())
    }
}

impl From<Client> for Connection {
    fn from(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl classbase_core::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        let stmt = match op {
            Operation::Transaction(op) => return self.transaction(op).await,
            Operation::Statement(stmt) => stmt,
        };

        let mut params = Vec::new();
        let sql_as_str = sql::Serializer::postgresql().serialize(&stmt, &mut params);

        tracing::debug!(sql = %sql_as_str, params = params.len(), "postgresql exec");

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();
        let args = params
            .iter()
            .map(|param| param as &(dyn ToSql + Sync))
            .collect::<Vec<_>>();

        if !stmt.returns_rows() {
            let count = self
                .client
                .execute(&sql_as_str, &args)
                .await
                .map_err(Error::driver)?;
            return Ok(Response::count(count));
        }

        let rows = self
            .client
            .query(&sql_as_str, &args)
            .await
            .map_err(Error::driver)?;

        let records = rows
            .iter()
            .map(|row| {
                let fields = row
                    .columns()
                    .iter()
                    .enumerate()
                    .map(|(i, column)| postgres_to_classbase(i, row, column))
                    .collect::<Result<Vec<_>>>()?;
                Ok(stmt::ValueRecord::from_vec(fields))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Response::values(records))
    }
}

/// Converts a PostgreSQL value within a row to a [`classbase_core::stmt::Value`].
fn postgres_to_classbase(index: usize, row: &Row, column: &Column) -> Result<stmt::Value> {
    let ty = column.type_();

    let value = if ty == &Type::TEXT || ty == &Type::VARCHAR {
        row.try_get::<usize, Option<String>>(index)
            .map_err(Error::driver)?
            .map(stmt::Value::String)
    } else if ty == &Type::BOOL {
        row.try_get::<usize, Option<bool>>(index)
            .map_err(Error::driver)?
            .map(stmt::Value::Bool)
    } else if ty == &Type::JSONB || ty == &Type::JSON {
        row.try_get::<usize, Option<serde_json::Value>>(index)
            .map_err(Error::driver)?
            .map(stmt::Value::Json)
    } else {
        return Err(err!(
            "unsupported PostgreSQL type `{}` in column `{}`",
            ty,
            column.name()
        ));
    };

    Ok(value.unwrap_or(stmt::Value::Null))
}
