pub mod fresnel;
