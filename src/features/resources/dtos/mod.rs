mod resource_dto;

pub use resource_dto::{
    AllocateResourceDto, AllocationListQuery, AllocationResponseDto, CreateResourceDto,
    ResourceResponseDto, UpdateResourceDto,
};
