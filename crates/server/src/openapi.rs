use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ResponseDtoDoc {
    #[schema(example = "201")]
    pub status_code: String,
    #[schema(example = "Loan created successfully")]
    pub status_msg: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ErrorResponseDoc {
    #[schema(example = "uri=/api/fetch")]
    pub api_path: String,
    #[schema(example = "NOT_FOUND")]
    pub error_code: String,
    pub error_message: String,
    pub error_time: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct LoanDoc {
    pub loan_id: Option<i64>,
    #[schema(example = "9876543210")]
    pub mobile_number: String,
    #[schema(example = "548732457654")]
    pub loan_number: String,
    #[schema(example = "Home Loan")]
    pub loan_type: String,
    #[schema(example = 100000)]
    pub total_loan: i32,
    #[schema(example = 1000)]
    pub amount_paid: i32,
    #[schema(example = 99000)]
    pub outstanding_amount: i32,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdateLoanRequestDoc {
    pub mobile_number: Option<String>,
    pub loan_number: String,
    pub loan_type: String,
    pub total_loan: i32,
    pub amount_paid: i32,
    /// Ignored; recomputed as totalLoan - amountPaid.
    pub outstanding_amount: Option<i32>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ContactInfoDoc {
    pub name: String,
    pub email: String,
    pub on_call_support: Vec<String>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Loans", description = "Loan account records keyed by mobile number"),
    paths(
        crate::routes::health,
        crate::routes::loans::create,
        crate::routes::loans::fetch,
        crate::routes::loans::update,
        crate::routes::loans::delete,
        crate::routes::info::build_info,
        crate::routes::info::message,
        crate::routes::info::contact_info,
    ),
    components(
        schemas(
            HealthResponse,
            ResponseDtoDoc,
            ErrorResponseDoc,
            LoanDoc,
            UpdateLoanRequestDoc,
            ContactInfoDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "loans"),
        (name = "info")
    )
)]
pub struct ApiDoc;
