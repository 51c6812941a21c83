pub mod ask_question_route;
pub mod health_route;
pub mod index_schemas_route;
