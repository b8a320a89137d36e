#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod session_cookie_tests;

#[cfg(test)]
mod dashboard_tests;

#[cfg(test)]
mod alert_tests;

#[cfg(test)]
mod patient_tests;

#[cfg(test)]
mod plan_tests;

#[cfg(test)]
mod health_tests;
