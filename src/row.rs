//! Row record and its binary encoding.
//!
//! Wire layout of one record, integers little-endian:
//!
//! ```text
//! [i32 id][u32 len][len bytes username][u32 len][len bytes email]
//! ```
//!
//! Records are length-prefixed, so the encoded size follows the actual string
//! lengths. There is no padding and no delimiter between records.

use std::fmt;

use crate::error::{DbError, Result};
use crate::{EMAIL_SIZE, ID_SIZE, LENGTH_PREFIX_SIZE, USERNAME_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: i32,
    username: String,
    email: String,
}

impl Row {
    /// Builds a validated row. Every `Row` in the system went through here.
    pub fn new(id: i32, username: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let email = email.into();

        if id < 0 {
            return Err(DbError::NegativeId(id));
        }
        check_len("username", &username, USERNAME_SIZE)?;
        check_len("email", &email, EMAIL_SIZE)?;

        Ok(Self {
            id,
            username,
            email,
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn encoded_len(&self) -> usize {
        ID_SIZE + 2 * LENGTH_PREFIX_SIZE + self.username.len() + self.email.len()
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf
    }

    /// Appends the encoded record to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.id.to_le_bytes());
        put_str(buf, &self.username);
        put_str(buf, &self.email);
    }

    /// Decodes one record starting at `cursor` and returns it together with
    /// the offset just past its last byte.
    pub fn decode(bytes: &[u8], cursor: usize) -> Result<(Row, usize)> {
        let start = cursor;
        let (id_bytes, cursor) = take(bytes, cursor, ID_SIZE, "id")?;
        let id = i32::from_le_bytes(to_array(id_bytes));
        let (username, cursor) = take_str(bytes, cursor, "username")?;
        let (email, cursor) = take_str(bytes, cursor, "email")?;

        let row = Row::new(id, username, email)
            .map_err(|e| DbError::corrupt(start, format!("invalid row: {e}")))?;
        Ok((row, cursor))
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(DbError::StringTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}

fn put_str(buf: &mut Vec<u8>, value: &str) {
    // Lengths are bounded by the column sizes, far below u32::MAX.
    buf.extend_from_slice(&(value.len() as u32).to_le_bytes());
    buf.extend_from_slice(value.as_bytes());
}

fn take<'a>(bytes: &'a [u8], cursor: usize, n: usize, field: &str) -> Result<(&'a [u8], usize)> {
    let end = cursor
        .checked_add(n)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| {
            DbError::corrupt(
                cursor,
                format!(
                    "{field} needs {n} bytes, {} remain",
                    bytes.len().saturating_sub(cursor)
                ),
            )
        })?;
    Ok((&bytes[cursor..end], end))
}

fn to_array(bytes: &[u8]) -> [u8; 4] {
    let mut out = [0u8; 4];
    out.copy_from_slice(bytes);
    out
}

fn take_str(bytes: &[u8], cursor: usize, field: &str) -> Result<(String, usize)> {
    let (len_bytes, cursor) = take(bytes, cursor, LENGTH_PREFIX_SIZE, field)?;
    let len = u32::from_le_bytes(to_array(len_bytes));
    let (raw, end) = take(bytes, cursor, len as usize, field)?;
    let value = std::str::from_utf8(raw)
        .map_err(|e| DbError::corrupt(cursor, format!("{field} is not valid UTF-8: {e}")))?;
    Ok((value.to_owned(), end))
}
