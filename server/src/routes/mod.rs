pub mod app_router;
pub mod classify;
pub mod home;

pub use app_router::AppRouter;
