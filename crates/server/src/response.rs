//! JSON envelope shared by every endpoint: `{"code", "message", "data"}`.

use axum::Json;
use serde::Serialize;

/// Numeric result codes carried in the envelope.
///
/// 100xx lawyer, 101xx case progress, 102xx merchant, 200xx auth, 300xx upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrCode {
    Success,
    InvalidParams,
    Error,

    ErrorExistLawyer,
    ErrorNotExistLawyer,
    ErrorGetLawyerFail,
    ErrorGetLawyersFail,
    ErrorAddLawyerFail,
    ErrorEditLawyerFail,
    ErrorDeleteLawyerFail,
    ErrorUpdateLawyerFail,

    ErrorNotExistProgress,
    ErrorNotExistProgressDetail,
    ErrorGetProgressFail,
    ErrorGetProgressesFail,
    ErrorAddProgressFail,
    ErrorUpdateProgressFail,
    ErrorDeleteProgressFail,

    ErrorNotExistMerchant,
    ErrorGetMerchantFail,
    ErrorGetMerchantsFail,
    ErrorAddMerchantFail,
    ErrorEditMerchantFail,
    ErrorDeleteMerchantFail,
    ErrorUpdateMerchantStatusFail,

    ErrorAuthCheckTokenFail,
    ErrorAuth,

    ErrorUploadSaveFileFail,
    ErrorUploadCheckFileFail,
    ErrorUploadCheckFileFormat,
    ErrorUploadFileTooLarge,
    ErrorUploadInvalidType,
}

impl ErrCode {
    pub fn code(self) -> u32 {
        use ErrCode::*;
        match self {
            Success => 200,
            InvalidParams => 400,
            Error => 500,

            ErrorExistLawyer => 10001,
            ErrorNotExistLawyer => 10002,
            ErrorGetLawyerFail => 10003,
            ErrorGetLawyersFail => 10004,
            ErrorAddLawyerFail => 10005,
            ErrorEditLawyerFail => 10006,
            ErrorDeleteLawyerFail => 10007,
            ErrorUpdateLawyerFail => 10008,

            ErrorNotExistProgress => 10101,
            ErrorNotExistProgressDetail => 10102,
            ErrorGetProgressFail => 10103,
            ErrorGetProgressesFail => 10104,
            ErrorAddProgressFail => 10105,
            ErrorUpdateProgressFail => 10106,
            ErrorDeleteProgressFail => 10107,

            ErrorNotExistMerchant => 10201,
            ErrorGetMerchantFail => 10202,
            ErrorGetMerchantsFail => 10203,
            ErrorAddMerchantFail => 10204,
            ErrorEditMerchantFail => 10205,
            ErrorDeleteMerchantFail => 10206,
            ErrorUpdateMerchantStatusFail => 10207,

            ErrorAuthCheckTokenFail => 20001,
            ErrorAuth => 20004,

            ErrorUploadSaveFileFail => 30001,
            ErrorUploadCheckFileFail => 30002,
            ErrorUploadCheckFileFormat => 30003,
            ErrorUploadFileTooLarge => 30004,
            ErrorUploadInvalidType => 30005,
        }
    }

    pub fn message(self) -> &'static str {
        use ErrCode::*;
        match self {
            Success => "ok",
            InvalidParams => "invalid params",
            Error => "fail",

            ErrorExistLawyer => "lawyer already exists",
            ErrorNotExistLawyer => "lawyer does not exist",
            ErrorGetLawyerFail => "failed to get lawyer",
            ErrorGetLawyersFail => "failed to list lawyers",
            ErrorAddLawyerFail => "failed to add lawyer",
            ErrorEditLawyerFail => "failed to edit lawyer",
            ErrorDeleteLawyerFail => "failed to delete lawyer",
            ErrorUpdateLawyerFail => "failed to update lawyer counters",

            ErrorNotExistProgress => "case progress does not exist",
            ErrorNotExistProgressDetail => "case progress has no detail",
            ErrorGetProgressFail => "failed to get case progress",
            ErrorGetProgressesFail => "failed to list case progress",
            ErrorAddProgressFail => "failed to add case progress",
            ErrorUpdateProgressFail => "failed to update case progress",
            ErrorDeleteProgressFail => "failed to delete case progress",

            ErrorNotExistMerchant => "merchant does not exist",
            ErrorGetMerchantFail => "failed to get merchant",
            ErrorGetMerchantsFail => "failed to list merchants",
            ErrorAddMerchantFail => "failed to add merchant",
            ErrorEditMerchantFail => "failed to edit merchant",
            ErrorDeleteMerchantFail => "failed to delete merchant",
            ErrorUpdateMerchantStatusFail => "failed to update merchant status",

            ErrorAuthCheckTokenFail => "token check failed",
            ErrorAuth => "authentication required",

            ErrorUploadSaveFileFail => "failed to save file",
            ErrorUploadCheckFileFail => "file check failed",
            ErrorUploadCheckFileFormat => "unsupported file format",
            ErrorUploadFileTooLarge => "file too large",
            ErrorUploadInvalidType => "unsupported upload type",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub code: u32,
    pub message: &'static str,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(code: ErrCode, data: T) -> Self {
        Self { code: code.code(), message: code.message(), data }
    }
}

/// Successful response carrying `data`.
pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope::new(ErrCode::Success, data))
}

/// `{"id": ..}` payload returned by create endpoints.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct IdResponse {
    pub id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_fall_in_their_ranges() {
        assert_eq!(ErrCode::Success.code(), 200);
        assert_eq!(ErrCode::ErrorNotExistLawyer.code() / 100, 100);
        assert_eq!(ErrCode::ErrorNotExistProgress.code() / 100, 101);
        assert_eq!(ErrCode::ErrorNotExistMerchant.code() / 100, 102);
        assert_eq!(ErrCode::ErrorAuth.code() / 100, 200);
        assert_eq!(ErrCode::ErrorUploadInvalidType.code() / 100, 300);
    }

    #[test]
    fn unit_data_serializes_as_null() {
        let v = serde_json::to_value(Envelope::new(ErrCode::Success, ())).unwrap();
        assert_eq!(v, serde_json::json!({"code": 200, "message": "ok", "data": null}));
    }
}
