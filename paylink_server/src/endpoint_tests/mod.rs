mod health;
mod helpers;
mod merchants;
mod mocks;
