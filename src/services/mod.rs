pub mod batch_writer;
pub mod product_mapper;
pub mod throttle;

pub use batch_writer::BatchWriter;
pub use product_mapper::map_product;
pub use throttle::RequestThrottle;
