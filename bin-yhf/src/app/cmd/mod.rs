pub mod homfly;
