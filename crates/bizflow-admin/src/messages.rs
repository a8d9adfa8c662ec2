//! User-facing strings

use bizflow_client::ClientError;

/// Shown while the gate checks for a token
pub const AUTH_CHECKING: &str = "Đang kiểm tra đăng nhập...";

/// Login failed without a backend message
pub const LOGIN_FAILED: &str = "Có lỗi xảy ra. Vui lòng thử lại.";
/// Login succeeded but no token came back
pub const LOGIN_NO_TOKEN: &str = "Đăng nhập thất bại. Vui lòng thử lại.";

/// Password and confirmation differ
pub const PASSWORD_MISMATCH: &str = "Mật khẩu xác nhận không khớp!";
/// Account created
pub const REGISTER_SUCCESS: &str = "Đăng ký thành công! Vui lòng đăng nhập.";
/// Registration failed without a backend message
pub const REGISTER_FAILED: &str = "Đăng ký thất bại. Vui lòng thử lại.";

/// Reset instructions sent
pub const FORGOT_SUCCESS: &str = "Hướng dẫn đã được gửi! Vui lòng kiểm tra email của bạn.";
/// Reset request failed
pub const FORGOT_FAILED: &str = "Email không tồn tại hoặc có lỗi xảy ra.";

/// Staff table is empty
pub const NO_STAFF: &str = "Chưa có nhân viên nào";

/// Account screen got a 403
pub const ACCOUNT_FORBIDDEN: &str =
    "Bạn không có quyền truy cập (403). Vui lòng dùng tài khoản ADMIN.";
/// A screen could not reach the backend
pub const CONNECTION_ERROR: &str = "Lỗi kết nối API. Vui lòng kiểm tra Server.";
/// Users endpoint returned nothing
pub const ACCOUNT_EMPTY: &str = "Không tìm thấy dữ liệu người dùng.";

/// Catalog is loading
pub const PRODUCTS_LOADING: &str = "Đang đồng bộ dữ liệu kho...";
/// Catalog failed to load without a backend message
pub const PRODUCTS_LOAD_FAILED: &str =
    "Không thể tải danh sách sản phẩm. Vui lòng kiểm tra Server.";
/// Asked before a product is deleted
pub const DELETE_CONFIRM: &str = "Bạn có chắc chắn muốn xóa sản phẩm này không?";
/// Product created
pub const PRODUCT_CREATED: &str = "Thêm mới thành công!";
/// Product updated
pub const PRODUCT_UPDATED: &str = "Cập nhật thành công!";
/// Product deleted
pub const PRODUCT_DELETED: &str = "Xóa sản phẩm thành công!";
/// Create failed
pub const PRODUCT_CREATE_FAILED: &str = "Có lỗi xảy ra khi thêm mới.";
/// Update failed
pub const PRODUCT_UPDATE_FAILED: &str = "Có lỗi xảy ra khi cập nhật.";
/// Delete failed
pub const PRODUCT_DELETE_FAILED: &str =
    "Không thể xóa sản phẩm này (có thể do ràng buộc dữ liệu).";
/// Unit cell when a product has neither unit name nor id
pub const UNIT_UNSET: &str = "Chưa thiết lập";

/// First bot message of the chat widget
pub const CHAT_GREETING: &str =
    "Xin chào! Tôi là trợ lý AI BizFlow. Bạn cần giúp gì về đơn hàng hay kho bãi không?";
/// Chat request failed
pub const CHAT_BUSY: &str = "Xin lỗi, server đang bận. Vui lòng thử lại sau.";

/// Backend message if it sent one, otherwise `fallback`
pub fn server_or(err: &ClientError, fallback: &str) -> String {
    err.server_message().unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_server_or_prefers_backend_text() {
        let err = ClientError::Unauthorized {
            message: "Sai mật khẩu".to_string(),
        };
        assert_eq!(server_or(&err, LOGIN_FAILED), "Sai mật khẩu");
        assert_eq!(server_or(&ClientError::MissingResult, LOGIN_FAILED), LOGIN_FAILED);
    }
}
