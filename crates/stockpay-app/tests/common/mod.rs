#[path = "../../../stockpay-feed/tests/common/mock_http.rs"]
pub mod mock_http;
