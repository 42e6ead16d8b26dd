pub mod internetx;
