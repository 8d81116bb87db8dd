pub mod seed_activities;
