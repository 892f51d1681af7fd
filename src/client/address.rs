//! Connection address parsing
//!
//! Supported format:
//! * taos://[host][:port][/[database]][?key=value&key=value...]
//!
//! `tsdb://` is accepted as an alias of `taos://`; both are matched
//! case-insensitively. Every segment after the scheme is optional. A segment
//! that is present but empty (`taos://:/`) normalizes to absent, never to an
//! empty string.

use crate::connection::ConnectionConfig;
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};

/// Primary scheme token
pub const SCHEME_TAOS: &str = "taos";

/// Alias scheme token, same protocol
pub const SCHEME_TSDB: &str = "tsdb";

/// Well-known option keys.
///
/// The parser passes every key through unvalidated; these constants only name
/// the ones the engine gives meaning to. The set is open: engine tuning keys
/// travel in the same map.
pub mod keys {
    /// Login user name
    pub const USER: &str = "user";

    /// Login password
    pub const PASSWORD: &str = "password";

    /// Client character set
    pub const CHARSET: &str = "charset";

    /// Client locale
    pub const LOCALE: &str = "locale";

    /// Client time zone
    pub const TIME_ZONE: &str = "timezone";
}

/// Strip a recognized scheme prefix, returning the remainder.
///
/// Recognition is case-insensitive on the scheme token and requires the
/// literal `://` separator.
fn strip_scheme(address: &str) -> Option<&str> {
    let (scheme, rest) = address.split_once("://")?;
    if scheme.eq_ignore_ascii_case(SCHEME_TAOS) || scheme.eq_ignore_ascii_case(SCHEME_TSDB) {
        Some(rest)
    } else {
        None
    }
}

/// Whether the address carries a recognized scheme.
///
/// This checks the scheme token only; the remainder of the address does not
/// need to be well-formed. A caller chaining several drivers can use this to
/// decide whether the string is this parser's concern at all.
pub fn accepts_scheme(address: &str) -> bool {
    strip_scheme(address).is_some()
}

/// Parse a connection address into a [`ConnectionConfig`].
///
/// Equivalent to [`parse_with`] with an empty seed table.
pub fn parse(address: &str) -> Result<ConnectionConfig> {
    parse_with(address, HashMap::new())
}

/// Parse a connection address, merging options embedded in the address into
/// the caller-supplied `seed` table.
///
/// Seed entries always win: a key defined in `seed` keeps its seeded value
/// even when the address query section defines the same key. Query-supplied
/// values are added only for keys the seed does not define. Within the query
/// section itself, the last occurrence of a duplicated key wins.
///
/// An address whose scheme matches neither alias yields
/// [`Error::SchemeMismatch`]; a malformed port yields
/// [`Error::InvalidAddress`]. On failure nothing is merged.
pub fn parse_with(address: &str, seed: HashMap<String, String>) -> Result<ConnectionConfig> {
    let rest = strip_scheme(address).ok_or_else(|| Error::SchemeMismatch(address.to_string()))?;

    // Scan the fixed grammar left to right:
    //   [host][:port][/[database]][?query]
    // All delimiters are ASCII, so byte offsets from find() are char-safe.
    let host_end = rest.find([':', '/', '?']).unwrap_or(rest.len());
    let host = &rest[..host_end];
    let mut cursor = host_end;

    let mut port_str = "";
    if rest[cursor..].starts_with(':') {
        cursor += 1;
        let port_end = rest[cursor..]
            .find(['/', '?'])
            .map(|i| cursor + i)
            .unwrap_or(rest.len());
        port_str = &rest[cursor..port_end];
        cursor = port_end;
    }

    let mut database = "";
    if rest[cursor..].starts_with('/') {
        cursor += 1;
        let db_end = rest[cursor..]
            .find('?')
            .map(|i| cursor + i)
            .unwrap_or(rest.len());
        database = &rest[cursor..db_end];
        cursor = db_end;
    }

    // Validate the port before touching the options table so a failed parse
    // merges nothing.
    let port = if port_str.is_empty() {
        None
    } else if port_str.bytes().all(|b| b.is_ascii_digit()) {
        Some(
            port_str
                .parse::<u16>()
                .map_err(|_| Error::invalid_address(format!("port out of range: {port_str}")))?,
        )
    } else {
        return Err(Error::invalid_address(format!(
            "port must be digits: {port_str}"
        )));
    };

    let seeded: HashSet<String> = seed.keys().cloned().collect();
    let mut options = seed;
    if rest[cursor..].starts_with('?') {
        for pair in rest[cursor + 1..].split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() || seeded.contains(key) {
                continue;
            }
            options.insert(key.to_string(), value.to_string());
        }
    }

    Ok(ConnectionConfig {
        host: (!host.is_empty()).then(|| host.to_string()),
        port,
        database: (!database.is_empty()).then(|| database.to_string()),
        options,
    })
}
