//! Parsing and execution of the line-oriented command language.

use std::io::Write;
use std::str::FromStr;

use thiserror::Error;

use crate::error::{DbError, Result};
use crate::row::Row;
use crate::table::Table;

// Non-SQL statements like .exit are called “meta-commands”.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
    Unrecognized,
}

impl MetaCommand {
    pub fn parse(input: &str) -> Option<MetaCommand> {
        match input {
            ".exit" => Some(MetaCommand::Exit),
            _ if input.starts_with('.') => Some(MetaCommand::Unrecognized),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("Syntax error. Could not parse statement.")]
    Syntax,

    #[error("Unrecognized command: {0}")]
    UnrecognizedStatement(String),

    #[error(transparent)]
    InvalidRow(#[from] DbError),
}

impl FromStr for Statement {
    type Err = PrepareError;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        let mut tokens = input.split_whitespace();
        match tokens.next() {
            Some("insert") => {
                let args: Vec<&str> = tokens.collect();
                let [id, username, email] = args.as_slice() else {
                    return Err(PrepareError::Syntax);
                };
                let id: i32 = id.parse().map_err(|_| PrepareError::Syntax)?;
                Ok(Statement::Insert(Row::new(id, *username, *email)?))
            }
            Some("select") if tokens.next().is_none() => Ok(Statement::Select),
            Some("select") => Err(PrepareError::Syntax),
            _ => Err(PrepareError::UnrecognizedStatement(input.to_string())),
        }
    }
}

pub enum InputType {
    Meta(MetaCommand),
    Statement(std::result::Result<Statement, PrepareError>),
}

impl InputType {
    pub fn parse(input: &str) -> InputType {
        if let Some(meta) = MetaCommand::parse(input) {
            InputType::Meta(meta)
        } else {
            InputType::Statement(input.parse())
        }
    }
}

/// Runs a statement against the table. Selected rows are written to `out`,
/// one `(id, username, email)` per line.
pub fn execute(statement: Statement, table: &mut Table, out: &mut impl Write) -> Result<()> {
    match statement {
        Statement::Insert(row) => table.insert(row),
        Statement::Select => {
            for row in table.scan() {
                writeln!(out, "{row}")?;
            }
            Ok(())
        }
    }
}
