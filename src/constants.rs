pub const AUTHORIZATION: &str = "Authorization";
pub const EMPTY: &str = "";
pub const ONE_WEEK: usize = 60 * 60 * 24 * 7; // in seconds

// routes served without a bearer token
pub const IGNORE_ROUTES: [&str; 2] = ["/signup", "/login"];

pub const BTC_DEPOSIT_ADDRESS: &str = "bc1q7uxgv5g44kz4k0jzay8lt9ucqhvx5kpesg75ne";

pub const PIN_LENGTH: usize = 16;
pub const VERIFICATION_CODE_LENGTH: usize = 16;
pub const MAX_PIN_ATTEMPTS: usize = 3;

pub const NOTIFICATION_UNREAD: &str = "UNREAD";

pub const UPLOAD_PREFIX: &str = "kryptonite_";
pub const DEFAULT_UPLOAD_DIR: &str = "public/uploads";
pub const DEFAULT_IMAGE_EXTENSIONS: &str = "jpeg,jpg,png";

pub const MAIL_FROM: &str = "no-reply@zetahub.com";

pub const MESSAGE_INVALID_TOKEN: &str = "Missing or invalid token";
pub const MESSAGE_ENTER_AUTH_CODE: &str = "Please enter your authentication code";
pub const MESSAGE_INVALID_AUTH_CODE: &str = "Invalid authentication code, please try again";
pub const MESSAGE_WITHDRAWAL_PROCESSING: &str =
	"Your withdrawal is being processed, you will be credited shortly.";
pub const MESSAGE_DEPOSIT_SUBMITTED: &str =
	"Your deposit claim has been submitted. Your account will be credited immediately it is verified";
pub const MESSAGE_NOTIFICATION_READ: &str = "Notification marked as read";
pub const MESSAGE_EMAIL_ALREADY_VERIFIED: &str = "Your email address has been verified already";
pub const MESSAGE_EMAIL_VERIFIED: &str = "Your email has been verified.";
pub const MESSAGE_INVALID_VERIFICATION_CODE: &str = "The code you entered is invalid, try again.";
pub const MESSAGE_NEW_CODE_SENT: &str =
	"A new verification code has been sent to your email address";
pub const MESSAGE_VERIFY_EMAIL_FIRST: &str = "Please verify your email";
pub const MESSAGE_WITHDRAWALS_DISABLED: &str = "Withdrawals are not enabled for your account";
pub const MESSAGE_DEPOSITS_DISABLED: &str = "Deposits are not enabled for your account";
pub const MESSAGE_DUPLICATE_EMAIL: &str =
	"The email address you used is registered to another account already";
pub const MESSAGE_INVALID_CREDENTIALS: &str = "Invalid email address or password";
pub const MESSAGE_LOGGED_OUT: &str = "You have been logged out of your account";
pub const MESSAGE_ADMIN_ONLY: &str = "You are not allowed to access this resource";
pub const MESSAGE_INVALID_FILE_TYPE: &str = "Invalid file type, only JPEG and PNG is allowed";
