pub mod workout_sets;
