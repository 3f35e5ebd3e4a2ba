use alist_models::{Entry, StatusFilter};

use crate::cache::ListCache;

/// Number of rows to print.
///
/// `requested` is the command-line override (0 = not given). Negative
/// counts, counts beyond the list length and `show_all` print every row.
pub fn visible_count(requested: i64, configured: i64, show_all: bool, len: usize) -> usize {
    let wanted = if requested != 0 { requested } else { configured };
    if show_all || wanted < 0 {
        return len;
    }
    usize::try_from(wanted).map_or(len, |n| n.min(len))
}

/// Entries passing `filter`, most recently updated first.
pub fn list_view<'a>(cache: &'a ListCache, filter: &StatusFilter) -> Vec<&'a Entry> {
    let mut rows: Vec<&Entry> = cache
        .entries()
        .iter()
        .filter(|e| filter.matches(e.status))
        .collect();
    rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::entry;
    use alist_models::{ListStatus, Viewer};

    #[test]
    fn test_visible_count() {
        assert_eq!(visible_count(0, 20, false, 50), 20);
        assert_eq!(visible_count(5, 20, false, 50), 5);
        assert_eq!(visible_count(0, 20, false, 3), 3);
        assert_eq!(visible_count(-1, 20, false, 50), 50);
        assert_eq!(visible_count(0, -1, false, 50), 50);
        assert_eq!(visible_count(5, 20, true, 50), 50);
        assert_eq!(visible_count(0, 20, false, 0), 0);
    }

    #[test]
    fn test_list_view_filters_and_sorts_by_update_time() {
        let cache = ListCache::new(
            Viewer { id: 1, name: "v".to_string() },
            vec![
                entry(3, "Old", ListStatus::Watching, 1, 12),
                entry(9, "New", ListStatus::Watching, 1, 12),
                entry(5, "Done", ListStatus::Completed, 12, 12),
            ],
        );

        let watching = list_view(&cache, &StatusFilter::Only(ListStatus::Watching));
        let ids: Vec<u64> = watching.iter().map(|e| e.list_id).collect();
        assert_eq!(ids, vec![9, 3]);

        let all = list_view(&cache, &StatusFilter::All);
        let ids: Vec<u64> = all.iter().map(|e| e.list_id).collect();
        assert_eq!(ids, vec![9, 5, 3]);
    }
}
