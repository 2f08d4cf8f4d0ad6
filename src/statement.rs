//! SQL statement generation.
//!
//! Every statement is produced by handing a structured description (table,
//! column/value pairs, filter predicate) to `sea-query` and rendering it
//! for the bound backend's dialect. The adapter never assembles SQL text
//! by hand — identifier quoting and value escaping stay the query
//! builder's problem.

use sea_query::{
    Alias, ColumnDef, Expr, Iden, MysqlQueryBuilder, PostgresQueryBuilder,
    Query, QueryStatementWriter, SimpleExpr, SqliteQueryBuilder, Table,
    TableCreateStatement,
};

use crate::driver::DatabaseKind;
use crate::record::{MAX_RULE_FIELDS, PolicyRecord};

/// Column identifiers of the policy table.
#[derive(Debug, Clone, Copy, Iden)]
enum PolicyColumn {
    Id,
    Ptype,
    V0,
    V1,
    V2,
    V3,
    V4,
    V5,
}

const SLOT_COLUMNS: [PolicyColumn; MAX_RULE_FIELDS] = [
    PolicyColumn::V0,
    PolicyColumn::V1,
    PolicyColumn::V2,
    PolicyColumn::V3,
    PolicyColumn::V4,
    PolicyColumn::V5,
];

/// Renders dialect-correct statements for one policy table.
///
/// Bound to a [`DatabaseKind`] once at adapter construction; this is the
/// only place backend identity influences statement text.
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    kind: DatabaseKind,
    table: String,
}

impl StatementBuilder {
    /// Creates a builder for the given backend dialect and table name.
    #[must_use]
    pub fn new(kind: DatabaseKind, table: &str) -> Self {
        Self {
            kind,
            table: table.to_string(),
        }
    }

    fn table(&self) -> Alias {
        Alias::new(self.table.as_str())
    }

    fn render<S: QueryStatementWriter>(&self, statement: &S) -> String {
        match self.kind {
            DatabaseKind::Postgres => statement.to_string(PostgresQueryBuilder),
            DatabaseKind::MySql => statement.to_string(MysqlQueryBuilder),
            DatabaseKind::Sqlite => statement.to_string(SqliteQueryBuilder),
        }
    }

    fn render_schema(&self, statement: &TableCreateStatement) -> String {
        match self.kind {
            DatabaseKind::Postgres => statement.to_string(PostgresQueryBuilder),
            DatabaseKind::MySql => statement.to_string(MysqlQueryBuilder),
            DatabaseKind::Sqlite => statement.to_string(SqliteQueryBuilder),
        }
    }

    /// SELECT of every row and every column, in slot order.
    #[must_use]
    pub fn select_all(&self) -> String {
        let mut columns = vec![PolicyColumn::Id, PolicyColumn::Ptype];
        columns.extend(SLOT_COLUMNS);
        let statement = Query::select()
            .columns(columns)
            .from(self.table())
            .to_owned();
        self.render(&statement)
    }

    /// INSERT of one encoded record. Only present slots become columns, so
    /// unused trailing slots land as NULL without being named.
    #[must_use]
    pub fn insert(&self, record: &PolicyRecord) -> String {
        let mut columns = vec![PolicyColumn::Ptype];
        let mut values: Vec<SimpleExpr> = vec![record.ptype.as_str().into()];
        for (column, slot) in SLOT_COLUMNS.iter().zip(record.slots()) {
            if let Some(value) = slot {
                columns.push(*column);
                values.push(value.into());
            }
        }
        let statement = Query::insert()
            .into_table(self.table())
            .columns(columns)
            .values_panic(values)
            .to_owned();
        self.render(&statement)
    }

    /// DELETE of every row.
    #[must_use]
    pub fn delete_all(&self) -> String {
        let statement = Query::delete().from_table(self.table()).to_owned();
        self.render(&statement)
    }

    /// DELETE constraining `ptype` and every present slot of `record`.
    ///
    /// Absent slots are left unconstrained, so a partial-match record
    /// produced by [`PolicyRecord::from_filter`] acts as a wildcard on the
    /// slots it does not name.
    #[must_use]
    pub fn delete_matching(&self, record: &PolicyRecord) -> String {
        let mut statement = Query::delete().from_table(self.table()).to_owned();
        statement.and_where(Expr::col(PolicyColumn::Ptype).eq(record.ptype.as_str()));
        for (column, slot) in SLOT_COLUMNS.iter().zip(record.slots()) {
            if let Some(value) = slot {
                statement.and_where(Expr::col(*column).eq(value));
            }
        }
        self.render(&statement)
    }

    /// CREATE TABLE IF NOT EXISTS with the fixed policy shape: an
    /// auto-incrementing surrogate key, a required `ptype`, and six
    /// nullable slot columns.
    #[must_use]
    pub fn create_table(&self) -> String {
        let mut statement = Table::create()
            .table(self.table())
            .if_not_exists()
            .col(
                ColumnDef::new(PolicyColumn::Id)
                    .big_integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(PolicyColumn::Ptype).string_len(255).not_null())
            .to_owned();
        for column in SLOT_COLUMNS {
            statement.col(ColumnDef::new(column).string_len(255));
        }
        self.render_schema(&statement)
    }
}
