mod month_filter;

pub use month_filter::MonthFilter;
