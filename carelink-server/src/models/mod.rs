mod requests;
mod user;

pub use requests::{
    DeviceTokenRequest, ExerciseRequest, ExerciseResponse, HealthReportRequest, HealthResponse,
    LoginCompleteRequest, MessageResponse, RefreshTokenRequest, RefreshTokenResponse,
    ReportCommentRequest, ReportCommentResponse,
};
pub use user::{ActivityAverage, ActivitySummary, DailyHealthReport, UserRecord};
