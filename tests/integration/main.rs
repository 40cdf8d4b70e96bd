//! Host-side integration tests: full control cycles against mock ports.

mod control_loop_tests;
mod mock_hw;
