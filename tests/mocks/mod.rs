//! Mock objects for integration tests

pub mod mock_sink;
