mod ras_windows;

pub use ras_windows::WindowsRas;
