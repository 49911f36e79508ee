/*! Record sources.

Sources sit at the head of the pipeline and decode physical rows into
raw entries.
!*/
mod kenall;

pub use kenall::KenAll;
