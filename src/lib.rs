//! Ring-layout relationship graph: layout, hit-testing, selection and
//! drawing, independent of any UI framework.

pub mod connectivity;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod render;
pub mod selection;
pub mod style;
pub mod widget;
