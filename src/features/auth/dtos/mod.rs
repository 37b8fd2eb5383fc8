mod auth_dto;

pub use auth_dto::{
    AuthResponseDto, AuthUserDto, Dashboard, LoginRequestDto, MeResponseDto, RegisterRequestDto,
};
