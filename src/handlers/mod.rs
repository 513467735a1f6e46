// handlers/mod.rs - Handler tiers
//
// public   → no session (service index, health)
// pages    → optional session, locale-prefixed learner pages
// elevated → admin session required (/api/admin/*)

pub mod elevated;
pub mod pages;
pub mod public;
