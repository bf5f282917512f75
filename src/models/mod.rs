pub mod city;
pub mod continent;
pub mod country;
pub mod response;
