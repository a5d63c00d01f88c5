pub mod cardname;
pub mod price;
pub mod price_result;
pub mod printing;
