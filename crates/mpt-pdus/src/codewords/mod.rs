pub mod ack;
pub mod ahoy;
pub mod aloha;
pub mod bcast;
pub mod gtc;
pub mod maint;
pub mod request;
pub mod samis;
pub mod sync;
