pub mod debouncer;
pub mod handler_404;
