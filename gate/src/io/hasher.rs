//! Category hashing over the filesystem.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::core::digest::{CategoryDigest, sort_matches};
use crate::core::types::{CategorySpec, HashRequest, HashResult};
use crate::error::GateError;
use crate::io::config::TokenPolicy;
use crate::io::matcher::expand_patterns;

/// Hash every category in the request.
///
/// Categories are independent: each gets its own digest over its own
/// matches. Only categories named in the request appear in the result.
#[instrument(skip_all, fields(categories = request.categories.len()))]
pub fn hash_categories(
    root: &Path,
    request: &HashRequest,
    policy: TokenPolicy,
) -> Result<BTreeMap<String, HashResult>, GateError> {
    let token = match (policy, request.workflow_id.as_deref()) {
        (TokenPolicy::Mix, Some(token)) => Some(token),
        (_, token) => {
            debug!(workflow_id = ?token, "cache-busting token not mixed into digests");
            None
        }
    };

    let mut results = BTreeMap::new();
    for (name, spec) in &request.categories {
        let result = hash_category(root, name, spec, token)?;
        results.insert(name.clone(), result);
    }
    Ok(results)
}

/// Hash one category: expand, sort, then feed each readable file in order.
///
/// A matched path that cannot be read (a directory, a file removed since
/// matching, missing permissions) contributes nothing to the digest but is
/// still listed in `files`.
pub fn hash_category(
    root: &Path,
    name: &str,
    spec: &CategorySpec,
    token: Option<&str>,
) -> Result<HashResult, GateError> {
    let mut matches = expand_patterns(root, &spec.patterns)?;
    sort_matches(&mut matches);

    let mut digest = CategoryDigest::new();
    let mut skipped = 0usize;
    for matched in &matches {
        match fs::read(&matched.full) {
            Ok(contents) => digest.update(&contents),
            Err(err) => {
                skipped += 1;
                warn!(
                    category = name,
                    path = %matched.display,
                    error = %err,
                    "skipping unreadable file"
                );
            }
        }
    }
    if let Some(token) = token {
        digest.update(token.as_bytes());
    }

    let bytes = digest.bytes();
    let result = HashResult {
        digest: digest.finish(),
        count: matches.len(),
        files: matches.into_iter().map(|matched| matched.display).collect(),
    };
    debug!(
        category = name,
        count = result.count,
        skipped,
        bytes,
        digest = %result.digest,
        "category hashed"
    );
    Ok(result)
}
