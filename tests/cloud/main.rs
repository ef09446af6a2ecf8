//! 配置中心客户端集成测试
//!
//! 使用 mockito 模拟配置中心：
//! ```bash
//! cargo test --test test_cloud
//! ```

mod client_tests;
mod layered_tests;
