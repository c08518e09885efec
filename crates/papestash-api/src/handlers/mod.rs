pub mod health;
pub mod wallpaper_delete;
pub mod wallpaper_get;
pub mod wallpaper_list;
pub mod wallpaper_upload;
