mod analyses_test;
mod corrections_test;
mod health_test;
mod reports_test;
