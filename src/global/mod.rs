pub mod middleware;
pub mod validator;
