mod raw_collection;
mod sort;

pub(crate) use raw_collection::RawCollection;
pub(crate) use sort::merge_sort_by;
