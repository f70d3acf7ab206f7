pub mod ack_function;
pub mod aloha_function;
pub mod maint_oper;
