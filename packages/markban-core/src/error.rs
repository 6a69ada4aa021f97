#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    #[error("not a valid kanban file: no column heading found")]
    NoColumns,
}
