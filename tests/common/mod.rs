pub mod fake_ras;
