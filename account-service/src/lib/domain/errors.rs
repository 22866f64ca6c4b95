use http::StatusCode;

/// Closed taxonomy of failures shared by every domain area.
///
/// Each kind carries a default status, a stable code and a default message.
/// Codes never change once published; clients match on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Common
    InternalServerError,
    InvalidInputValue,
    MethodNotAllowed,
    EntityNotFound,
    InvalidTypeValue,
    AccessDenied,

    // Account
    UserNotFound,
    DuplicateEmail,
    InvalidPassword,
    Unauthorized,
    DuplicateNickname,

    // Post
    PostNotFound,
    PostAlreadyDeleted,

    // Comment
    CommentNotFound,
    CommentAlreadyDeleted,
    InvalidParentComment,

    // Category
    CategoryNotFound,
    DuplicateCategoryName,

    // Like
    AlreadyLiked,
    LikeNotFound,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InvalidInputValue
            | ErrorCode::InvalidTypeValue
            | ErrorCode::InvalidPassword
            | ErrorCode::PostAlreadyDeleted
            | ErrorCode::CommentAlreadyDeleted
            | ErrorCode::InvalidParentComment => StatusCode::BAD_REQUEST,
            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::EntityNotFound
            | ErrorCode::UserNotFound
            | ErrorCode::PostNotFound
            | ErrorCode::CommentNotFound
            | ErrorCode::CategoryNotFound
            | ErrorCode::LikeNotFound => StatusCode::NOT_FOUND,
            ErrorCode::AccessDenied => StatusCode::FORBIDDEN,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::DuplicateEmail
            | ErrorCode::DuplicateNickname
            | ErrorCode::DuplicateCategoryName
            | ErrorCode::AlreadyLiked => StatusCode::CONFLICT,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InternalServerError => "C001",
            ErrorCode::InvalidInputValue => "C002",
            ErrorCode::MethodNotAllowed => "C003",
            ErrorCode::EntityNotFound => "C004",
            ErrorCode::InvalidTypeValue => "C005",
            ErrorCode::AccessDenied => "C006",
            ErrorCode::UserNotFound => "U001",
            ErrorCode::DuplicateEmail => "U002",
            ErrorCode::InvalidPassword => "U003",
            ErrorCode::Unauthorized => "U004",
            ErrorCode::DuplicateNickname => "U005",
            ErrorCode::PostNotFound => "P001",
            ErrorCode::PostAlreadyDeleted => "P002",
            ErrorCode::CommentNotFound => "M001",
            ErrorCode::CommentAlreadyDeleted => "M002",
            ErrorCode::InvalidParentComment => "M003",
            ErrorCode::CategoryNotFound => "T001",
            ErrorCode::DuplicateCategoryName => "T002",
            ErrorCode::AlreadyLiked => "L001",
            ErrorCode::LikeNotFound => "L002",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::InternalServerError => "Internal server error",
            ErrorCode::InvalidInputValue => "Invalid input value",
            ErrorCode::MethodNotAllowed => "Method not allowed",
            ErrorCode::EntityNotFound => "Entity not found",
            ErrorCode::InvalidTypeValue => "Invalid type value",
            ErrorCode::AccessDenied => "Access denied",
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::DuplicateEmail => "Email already exists",
            ErrorCode::InvalidPassword => "Invalid password",
            ErrorCode::Unauthorized => "Unauthorized",
            ErrorCode::DuplicateNickname => "Nickname already exists",
            ErrorCode::PostNotFound => "Post not found",
            ErrorCode::PostAlreadyDeleted => "Post already deleted",
            ErrorCode::CommentNotFound => "Comment not found",
            ErrorCode::CommentAlreadyDeleted => "Comment already deleted",
            ErrorCode::InvalidParentComment => "Invalid parent comment",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::DuplicateCategoryName => "Category name already exists",
            ErrorCode::AlreadyLiked => "Already liked",
            ErrorCode::LikeNotFound => "Like not found",
        }
    }
}
