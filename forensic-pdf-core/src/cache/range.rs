//! Range-expression parsing for cache selectors (`1-50`, `1,3,5`,
//! `1-100:odd`, `all`, `0`).

/// Result of expanding a range expression: the resolved ids plus a count of
/// ids in the expression that don't correspond to an id range issue (that's
/// a store lookup concern, not a parse concern) — missing ids are reported
/// by the caller after it checks which resolved ids actually exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Range {
    /// `0`: the current session's most recently ingested cache.
    Latest,
    /// `all`: every cache id in ascending order.
    All,
    /// An explicit, already-deduplicated ascending list of ids.
    Ids(Vec<i64>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parity {
    Any,
    Odd,
    Even,
}

/// Parse a range expression. Does not touch the store; `0` and `all`
/// resolve lazily against session/store state at lookup time.
pub fn parse(spec: &str) -> Result<Range, String> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err("empty range expression".to_string());
    }
    if spec.eq_ignore_ascii_case("all") {
        return Ok(Range::All);
    }
    if spec == "0" {
        return Ok(Range::Latest);
    }

    let (body, parity) = match spec.rsplit_once(':') {
        Some((body, "odd")) => (body, Parity::Odd),
        Some((body, "even")) => (body, Parity::Even),
        Some((_, suffix)) => return Err(format!("unknown range suffix ':{suffix}'")),
        None => (spec, Parity::Any),
    };

    let mut ids = std::collections::BTreeSet::new();
    for part in body.split(',') {
        let part = part.trim();
        if part.is_empty() {
            return Err("empty segment in range expression".to_string());
        }
        if let Some((lo, hi)) = part.split_once('-') {
            let lo: i64 = lo
                .trim()
                .parse()
                .map_err(|_| format!("invalid range start '{lo}'"))?;
            let hi: i64 = hi
                .trim()
                .parse()
                .map_err(|_| format!("invalid range end '{hi}'"))?;
            if lo > hi {
                return Err(format!("range start {lo} is greater than end {hi}"));
            }
            for id in lo..=hi {
                ids.insert(id);
            }
        } else {
            let id: i64 = part
                .parse()
                .map_err(|_| format!("invalid cache id '{part}'"))?;
            ids.insert(id);
        }
    }

    let ids: Vec<i64> = ids
        .into_iter()
        .filter(|id| match parity {
            Parity::Any => true,
            Parity::Odd => id.rem_euclid(2) == 1,
            Parity::Even => id.rem_euclid(2) == 0,
        })
        .collect();

    Ok(Range::Ids(ids))
}
