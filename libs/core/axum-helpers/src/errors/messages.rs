//! Client-facing messages and reason-phrase codes shared by error responses.

pub const INTERNAL_ERROR: &str =
    "Ocorreu um erro interno, tente novamente mais tarde ou contate um administrador";
pub const VALIDATION_FAILED: &str = "Os dados informados sao invalidos";
pub const NOT_FOUND_RESOURCE: &str = "Recurso nao encontrado";

// Reason phrases carried in `ErrorResponse::code`
pub const CODE_BAD_REQUEST: &str = "Bad Request";
pub const CODE_NOT_FOUND: &str = "Not Found";
pub const CODE_INTERNAL: &str = "Internal Server Error";
