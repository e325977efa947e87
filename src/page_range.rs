use crate::config::PartSpec;
use crate::error::SplitError;

/// Resolved, zero-based page span of one part: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartRange {
    pub position: usize,
    pub name: String,
    pub start: u32,
    pub end: u32,
}

impl PartRange {
    /// 1-based page numbers covered by this part
    pub fn page_numbers(&self) -> Vec<u32> {
        (self.start + 1..=self.end).collect()
    }
}

/// Zero-based start of `part`, given the zero-based start of the part before it.
///
/// Positive start pages are absolute and 1-based. Negative ones count forward
/// from `prev_start`, so `-3` after a part starting at index 4 lands on index 7.
pub fn resolve(prev_start: u64, part: &PartSpec) -> u64 {
    if part.start_page < 0 {
        // Saturates; plan_parts rejects anything past the last page.
        prev_start.saturating_add(part.start_page.unsigned_abs())
    } else {
        part.start_page.unsigned_abs().saturating_sub(1)
    }
}

/// Zero-based start of every part, in list order
pub fn resolve_starts(parts: &[PartSpec]) -> Vec<u64> {
    parts
        .iter()
        .scan(0u64, |prev, part| {
            let start = resolve(*prev, part);
            *prev = start;
            Some(start)
        })
        .collect()
}

/// Turn the part list into contiguous page ranges over a document of
/// `total_pages` pages. Each part runs up to the next part's start; the last
/// one runs to the end of the document.
pub fn plan_parts(parts: &[PartSpec], total_pages: u32) -> Result<Vec<PartRange>, SplitError> {
    let starts = resolve_starts(parts);
    let total = u64::from(total_pages);

    for (part, &start) in parts.iter().zip(&starts) {
        if start >= total {
            return Err(SplitError::PageOutOfRange {
                part: part.name.clone(),
                page: start.saturating_add(1),
                total: total_pages,
            });
        }
    }

    let mut ranges = Vec::with_capacity(parts.len());
    for (position, part) in parts.iter().enumerate() {
        let start = starts[position];
        let end = starts.get(position + 1).copied().unwrap_or(total);

        if end <= start {
            return Err(SplitError::EmptyPart {
                part: part.name.clone(),
            });
        }

        // Both bounds are <= total_pages here, so they fit in u32.
        ranges.push(PartRange {
            position,
            name: part.name.clone(),
            start: start as u32,
            end: end as u32,
        });
    }

    Ok(ranges)
}
