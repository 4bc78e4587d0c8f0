//! Identifier Resolver
//!
//! Accepts a string that may be a name or an id. The name lookup always runs
//! first; the id lookup only runs when the name lookup reports `not_found`.

use crate::envelope::Envelope;
use crate::Result;
use std::future::Future;

/// Resolve `identifier` with `by_name`, falling back to `by_id`.
///
/// - a name match wins, even when the string is also a valid id
/// - a non-`not_found` failure from either lookup is returned immediately
/// - when both miss, the failure lists the name errors then the id errors
pub async fn resolve<N, NF, I, IF>(identifier: &str, by_name: N, by_id: I) -> Result<Envelope>
where
    N: FnOnce() -> NF,
    NF: Future<Output = Result<Envelope>>,
    I: FnOnce() -> IF,
    IF: Future<Output = Result<Envelope>>,
{
    let named = by_name().await?;
    if !named.is_not_found() {
        return Ok(named);
    }

    tracing::debug!("No record named {}, trying it as an id", identifier);
    let by_id = by_id().await?;
    if !by_id.is_not_found() {
        return Ok(by_id);
    }

    let mut errors = named.errors().map(<[_]>::to_vec).unwrap_or_default();
    errors.extend(by_id.errors().map(<[_]>::to_vec).unwrap_or_default());
    Ok(Envelope::failure(errors))
}
