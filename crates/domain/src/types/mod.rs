//! Domain types and models
//!
//! Wire shapes of the OCR backend. Auth payloads use snake_case field names;
//! file, conversion and record payloads use camelCase, mirroring the backend.

pub mod billing;
pub mod company;
pub mod conversion;
pub mod data;
pub mod files;
pub mod user;

pub use billing::{
    BillingHistory, BillingRecord, BillingSummary, BillingTotals, InvoiceDownload, InvoiceInfo,
    MonthlyUsage, UsageStats,
};
pub use company::{Company, CompanyMember, InvitedMember, MemberInvite};
pub use conversion::{
    ConversionJob, ConversionProgress, ConversionRequest, ConversionStarted, JobList, JobStatus,
};
pub use data::{CsvFormat, ExtractedRecord, RecordList, RecordUpdate};
pub use files::{
    FileItem, FileListing, FolderItem, Pagination, SingleUpload, UploadResult, UploadedFile,
};
pub use user::{
    AuthResponse, CompanyRegistration, CompleteRegistration, EmailVerification, ProfileUpdate,
    ProvisionalRegistration, ProvisionalUser, RegisterRequest, User, UserProfile,
};

use serde::{Deserialize, Serialize};

/// Generic acknowledgement returned by mutation endpoints
/// (`{"success": true, "message": "..."}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
