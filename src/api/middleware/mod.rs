pub mod caller_token;
