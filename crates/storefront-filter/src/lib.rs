pub mod cascade;
pub mod count;
pub mod facets;
pub mod pagination;
pub mod query_state;
pub mod schedule;
pub mod sort;

pub use cascade::CascadeTracker;
pub use count::{CountAction, CountReconciler, CountTicket};
pub use facets::{display_values, merge_canonical, title_case, FacetOrderCache};
pub use pagination::{
    build_pagination_url, page_args, ListingState, PageLink, PaginationTarget, LISTING_PAGE_SIZE,
};
pub use query_state::{
    FilterCodec, QueryState, QueryUpdate, SortSelection, UngroupedTokenPolicy,
};
pub use schedule::{ManualScheduler, Scheduler, TokioScheduler};
pub use sort::{SortOption, SORT_OPTIONS};
