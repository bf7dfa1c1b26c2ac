
mod dashboard_test;
