mod posting_dto;

pub use posting_dto::{
    ApplicationResponseDto, ApplyDto, CreatePostingDto, PostingResponseDto,
    UpdateApplicationStatusDto,
};
