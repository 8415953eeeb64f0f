pub mod catalog_service;
pub mod esim_service;
pub mod profile_service;
pub mod purchase_service;
pub mod referral_service;
pub mod sheet_service;
pub mod topup_service;
