// ── List view controller ──
//
// The one state machine behind every paginated table in the console:
// `idle → loading → (loaded | failed)`, re-entered whenever the page,
// search term, or a filter changes. Rows are replaced wholesale on success
// and cleared on failure. Sorting is applied to the loaded page only and
// never re-requests from the server.
//
// Two guards close the races the async UI would otherwise have:
// - every fetch mints a monotonically increasing token, and completions
//   carrying a stale token are discarded;
// - a per-entity busy set rejects a second mutation (delete, status toggle)
//   while one is already in flight.

use std::cmp::Ordering;
use std::collections::HashSet;

/// Load state of one list view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Rows and page count reflect the last successful fetch.
    Loaded,
    /// The last fetch failed; rows were cleared.
    Failed(String),
}

/// Sort direction for the active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Comparable cell value for client-side sorting.
///
/// Text compares lexicographically and case-sensitively; flags compare
/// numerically (false before true). Mixed kinds order flags before text,
/// though a well-typed column never produces both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortValue {
    Text(String),
    Flag(bool),
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Flag(a), Self::Flag(b)) => a.cmp(b),
            (Self::Flag(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Flag(_)) => Ordering::Greater,
        }
    }
}

/// Row types a [`ListView`] can manage.
pub trait Sortable {
    /// Column identifier, usually a small screen-owned enum.
    type Column: Copy + Eq;

    /// The comparable value of `column` for this row.
    fn sort_value(&self, column: Self::Column) -> SortValue;

    /// Stable entity id, used by busy guards and optimistic swaps.
    fn row_id(&self) -> &str;
}

/// Token identifying one fetch. Completions are applied only if their
/// token is still the latest one issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

/// State for one paginated, sortable, mutable table.
pub struct ListView<T: Sortable> {
    state: LoadState,
    /// Rows in server-provided order.
    rows: Vec<T>,
    /// Server-reported page count. Zero means "no pages to render".
    max_page: u32,
    /// Current page, 1-based.
    page: u32,
    sort: Option<(T::Column, SortOrder)>,
    seq: u64,
    busy: HashSet<String>,
}

impl<T: Sortable> Default for ListView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sortable> ListView<T> {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            rows: Vec::new(),
            max_page: 0,
            page: 1,
            sort: None,
            seq: 0,
            busy: HashSet::new(),
        }
    }

    // ── State accessors ──────────────────────────────────────────────

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// The stored failure message, if the last fetch failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Rows in server-provided order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    // ── Pagination ───────────────────────────────────────────────────

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn max_page(&self) -> u32 {
        self.max_page
    }

    /// Page buttons to render. Empty when the server reported zero pages.
    pub fn page_numbers(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.max_page
    }

    /// Move to `page`, clamped to at least 1. Returns `true` if the page
    /// changed (the caller should re-fetch).
    pub fn set_page(&mut self, page: u32) -> bool {
        let target = page.max(1);
        if target == self.page {
            return false;
        }
        self.page = target;
        true
    }

    /// Move forward one page if the server reported more.
    pub fn next_page(&mut self) -> bool {
        if self.page < self.max_page {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Move back one page.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    // ── Fetch lifecycle ──────────────────────────────────────────────

    /// Enter the loading state and mint the token for this fetch.
    ///
    /// Clears any stored error. Existing rows stay visible until the
    /// completion arrives.
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.seq += 1;
        self.state = LoadState::Loading;
        FetchToken(self.seq)
    }

    /// Apply a successful fetch: replace the row set and page count.
    ///
    /// Returns `false` (and changes nothing) when `token` is stale --
    /// a newer fetch has been issued since this one started.
    pub fn apply_success(&mut self, token: FetchToken, rows: Vec<T>, max_page: u32) -> bool {
        if token.0 != self.seq {
            tracing::debug!(token = token.0, current = self.seq, "discarding stale fetch");
            return false;
        }
        self.rows = rows;
        self.max_page = max_page;
        self.state = LoadState::Loaded;
        true
    }

    /// Apply a failed fetch: clear rows, store the message.
    ///
    /// Stale failures are discarded like stale successes.
    pub fn apply_failure(&mut self, token: FetchToken, message: impl Into<String>) -> bool {
        if token.0 != self.seq {
            return false;
        }
        self.rows.clear();
        self.state = LoadState::Failed(message.into());
        true
    }

    // ── Sorting ──────────────────────────────────────────────────────

    pub fn sort(&self) -> Option<(T::Column, SortOrder)> {
        self.sort
    }

    /// Advance the three-state sort toggle for `column`:
    /// unsorted → ascending → descending → unsorted. Selecting a different
    /// column always starts at ascending.
    pub fn cycle_sort(&mut self, column: T::Column) -> Option<SortOrder> {
        self.sort = match self.sort {
            Some((current, SortOrder::Ascending)) if current == column => {
                Some((column, SortOrder::Descending))
            }
            Some((current, SortOrder::Descending)) if current == column => None,
            _ => Some((column, SortOrder::Ascending)),
        };
        self.sort.map(|(_, order)| order)
    }

    /// Rows with the active sort applied — the order the table renders.
    ///
    /// With no active sort this is the server-provided order. Only the
    /// loaded page is sorted; the server is never asked to re-order.
    pub fn ordered(&self) -> Vec<&T> {
        let mut view: Vec<&T> = self.rows.iter().collect();
        if let Some((column, order)) = self.sort {
            view.sort_by(|a, b| {
                let ordering = a.sort_value(column).cmp(&b.sort_value(column));
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }
        view
    }

    // ── Mutation guards ──────────────────────────────────────────────

    /// Claim the mutation slot for `id`. Returns `false` when a mutation
    /// for that entity is already in flight — the caller must not issue
    /// a second one.
    pub fn begin_mutation(&mut self, id: &str) -> bool {
        self.busy.insert(id.to_owned())
    }

    /// Release the mutation slot for `id`.
    pub fn finish_mutation(&mut self, id: &str) {
        self.busy.remove(id);
    }

    pub fn is_busy(&self, id: &str) -> bool {
        self.busy.contains(id)
    }

    // ── Optimistic mutation ──────────────────────────────────────────

    /// Replace the row with `replacement.row_id()` in place, returning the
    /// previous row as a rollback snapshot. Returns `None` (and changes
    /// nothing) if no row matches.
    pub fn optimistic_swap(&mut self, replacement: T) -> Option<T> {
        let idx = self
            .rows
            .iter()
            .position(|row| row.row_id() == replacement.row_id())?;
        Some(std::mem::replace(&mut self.rows[idx], replacement))
    }

    /// Restore a snapshot taken by [`optimistic_swap`](Self::optimistic_swap).
    ///
    /// No-op if the row disappeared in the meantime (e.g. a re-fetch
    /// replaced the page).
    pub fn rollback(&mut self, snapshot: T) {
        if let Some(idx) = self
            .rows
            .iter()
            .position(|row| row.row_id() == snapshot.row_id())
        {
            self.rows[idx] = snapshot;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        name: String,
        active: bool,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Column {
        Name,
        Active,
    }

    impl Sortable for Row {
        type Column = Column;

        fn sort_value(&self, column: Column) -> SortValue {
            match column {
                Column::Name => SortValue::Text(self.name.clone()),
                Column::Active => SortValue::Flag(self.active),
            }
        }

        fn row_id(&self) -> &str {
            &self.id
        }
    }

    fn row(id: &str, name: &str, active: bool) -> Row {
        Row {
            id: id.into(),
            name: name.into(),
            active,
        }
    }

    fn loaded_view() -> ListView<Row> {
        let mut view = ListView::new();
        let token = view.begin_fetch();
        view.apply_success(
            token,
            vec![
                row("1", "delta", true),
                row("2", "alpha", false),
                row("3", "Echo", true),
            ],
            5,
        );
        view
    }

    fn names(view: &ListView<Row>) -> Vec<String> {
        view.ordered().iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn fetch_lifecycle_replaces_rows_and_page_count() {
        let mut view: ListView<Row> = ListView::new();
        assert_eq!(*view.state(), LoadState::Idle);

        let token = view.begin_fetch();
        assert!(view.is_loading());

        assert!(view.apply_success(token, vec![row("1", "a", true)], 3));
        assert_eq!(*view.state(), LoadState::Loaded);
        assert_eq!(view.len(), 1);
        assert_eq!(view.max_page(), 3);
    }

    #[test]
    fn failure_clears_rows_and_stores_message() {
        let mut view = loaded_view();
        let token = view.begin_fetch();

        assert!(view.apply_failure(token, "service unavailable"));
        assert!(view.is_empty());
        assert_eq!(view.error(), Some("service unavailable"));
        assert!(!view.is_loading());
    }

    #[test]
    fn begin_fetch_clears_previous_error() {
        let mut view: ListView<Row> = ListView::new();
        let token = view.begin_fetch();
        view.apply_failure(token, "boom");

        view.begin_fetch();
        assert_eq!(view.error(), None);
        assert!(view.is_loading());
    }

    #[test]
    fn stale_success_is_discarded() {
        let mut view: ListView<Row> = ListView::new();
        let first = view.begin_fetch();
        let second = view.begin_fetch();

        // Newest fetch lands first.
        assert!(view.apply_success(second, vec![row("2", "new", true)], 2));
        // The superseded fetch resolves late — it must not overwrite.
        assert!(!view.apply_success(first, vec![row("1", "old", true)], 9));

        assert_eq!(names(&view), vec!["new"]);
        assert_eq!(view.max_page(), 2);
    }

    #[test]
    fn stale_failure_is_discarded() {
        let mut view: ListView<Row> = ListView::new();
        let first = view.begin_fetch();
        let second = view.begin_fetch();

        assert!(view.apply_success(second, vec![row("2", "kept", true)], 1));
        assert!(!view.apply_failure(first, "late error"));

        assert_eq!(*view.state(), LoadState::Loaded);
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn empty_fetch_renders_no_page_buttons() {
        let mut view: ListView<Row> = ListView::new();
        let token = view.begin_fetch();
        view.apply_success(token, Vec::new(), 0);

        assert!(view.is_empty());
        assert_eq!(view.page_numbers().count(), 0);
    }

    #[test]
    fn sort_cycle_ascending_descending_then_server_order() {
        let mut view = loaded_view();
        assert_eq!(names(&view), vec!["delta", "alpha", "Echo"]);

        // 1st click: ascending, case-sensitive — uppercase sorts first.
        assert_eq!(view.cycle_sort(Column::Name), Some(SortOrder::Ascending));
        assert_eq!(names(&view), vec!["Echo", "alpha", "delta"]);

        // 2nd click: descending.
        assert_eq!(view.cycle_sort(Column::Name), Some(SortOrder::Descending));
        assert_eq!(names(&view), vec!["delta", "alpha", "Echo"]);

        // 3rd click: back to server-provided order.
        assert_eq!(view.cycle_sort(Column::Name), None);
        assert_eq!(names(&view), vec!["delta", "alpha", "Echo"]);
        assert_eq!(view.sort(), None);
    }

    #[test]
    fn switching_column_restarts_at_ascending() {
        let mut view = loaded_view();
        view.cycle_sort(Column::Name);
        view.cycle_sort(Column::Name); // Name descending

        assert_eq!(view.cycle_sort(Column::Active), Some(SortOrder::Ascending));
        // false sorts before true ascending
        let actives: Vec<bool> = view.ordered().iter().map(|r| r.active).collect();
        assert_eq!(actives, vec![false, true, true]);
    }

    #[test]
    fn bool_columns_compare_numerically() {
        let mut view = loaded_view();
        view.cycle_sort(Column::Active);
        view.cycle_sort(Column::Active); // descending: true first

        let actives: Vec<bool> = view.ordered().iter().map(|r| r.active).collect();
        assert_eq!(actives, vec![true, true, false]);
    }

    #[test]
    fn mutation_guard_rejects_second_in_flight_mutation() {
        let mut view = loaded_view();

        assert!(view.begin_mutation("2"));
        assert!(!view.begin_mutation("2"));
        assert!(view.is_busy("2"));
        // Other rows are unaffected.
        assert!(view.begin_mutation("3"));

        view.finish_mutation("2");
        assert!(!view.is_busy("2"));
        assert!(view.begin_mutation("2"));
    }

    #[test]
    fn optimistic_swap_and_rollback() {
        let mut view = loaded_view();

        let snapshot = view
            .optimistic_swap(row("2", "alpha", true))
            .expect("row 2 exists");
        assert!(!snapshot.active);
        assert!(view.rows().iter().any(|r| r.id == "2" && r.active));

        // Update call failed — restore the snapshot.
        view.rollback(snapshot);
        assert!(view.rows().iter().any(|r| r.id == "2" && !r.active));
    }

    #[test]
    fn optimistic_swap_unknown_row_is_noop() {
        let mut view = loaded_view();
        assert!(view.optimistic_swap(row("99", "ghost", true)).is_none());
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn page_navigation_clamps() {
        let mut view = loaded_view(); // max_page 5
        assert_eq!(view.page(), 1);
        assert!(!view.prev_page());
        assert!(view.next_page());
        assert_eq!(view.page(), 2);
        assert!(view.set_page(5));
        assert!(!view.next_page());
        assert!(!view.set_page(5));
        assert!(view.set_page(0));
        assert_eq!(view.page(), 1);
    }
}
