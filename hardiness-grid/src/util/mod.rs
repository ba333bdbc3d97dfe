pub mod polygonal_rtree;
